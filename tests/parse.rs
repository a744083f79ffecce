#[macro_use]
mod common;

#[cfg(test)]
mod parse {
    tests! {
        missing_semicolon in parse is ERR(65)
        "[line 2] Error at 'print': Expect ';' after a value."
    }

    tests! {
        expect_expression in parse is ERR(65)
        "[line 1] Error at ';': Expect expression."
    }

    tests! {
        multiple_errors in parse is ERR(65)
        "[line 1] Error at '1': Expect a variable name."
        "[line 2] Error at ';': Expect expression."
    }

    tests! {
        unclosed_block in parse is ERR(65)
        "[line 2] Error at the end: Expect '}' after block."
    }
}
