#[macro_use]
mod common;

#[cfg(test)]
mod closure {
    tests! {
        counter in closure is OK
        "1"
        "2"
    }

    tests! {
        shared_environment in closure is OK
        "7"
    }

    tests! {
        close_over_parameter in closure is OK
        "captured"
    }

    tests! {
        nested in closure is OK
        "ab"
    }
}
