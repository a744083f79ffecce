#[macro_use]
mod common;

#[cfg(test)]
mod comment {
    tests! {
        line_comments in comment is OK
        "one"
        "two"
    }

    tests! {
        division_not_comment in comment is OK
        "2"
    }
}
