#[macro_use]
mod common;

#[cfg(test)]
mod scan {
    tests! {
        unexpected_character in scan is ERR(65)
        "[line 1] Error: Unexpected character '@'"
    }

    tests! {
        unterminated_string in scan is ERR(65)
        "[line 2] Error: Unterminated string"
    }
}
