#[macro_use]
mod common;

#[cfg(test)]
mod _for {
    tests! {
        basic in for is OK
        "0"
        "1"
        "2"
    }

    tests! {
        no_initializer in for is OK
        "0"
        "1"
    }

    tests! {
        no_increment in for is OK
        "0"
        "1"
    }

    tests! {
        expression_initializer in for is OK
        "0"
        "1"
    }
}
