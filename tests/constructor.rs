#[macro_use]
mod common;

#[cfg(test)]
mod constructor {
    tests! {
        default in constructor is OK
        "A instance"
    }

    tests! {
        arguments in constructor is OK
        "3"
        "4"
    }

    tests! {
        init_arity in constructor is ERR(70)
        "): Expected 2 arguments but got 1."
        "[line 7]"
    }

    tests! {
        return_value in constructor is ERR(65)
        "[line 3] Error at 'return': Can't return a value from an initializer."
    }

    tests! {
        init_returns_instance in constructor is OK
        "true"
        "true"
    }
}
