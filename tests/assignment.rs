#[macro_use]
mod common;

#[cfg(test)]
mod assignment {
    tests! {
        simple in assignment is OK
        "2"
    }

    tests! {
        chained in assignment is OK
        "3"
        "3"
    }

    tests! {
        returns_value in assignment is OK
        "2"
    }

    tests! {
        invalid_target in assignment is ERR(65)
        "[line 1] Error at '=': Invalid assignment target."
    }

    tests! {
        grouping_target in assignment is ERR(65)
        "[line 1] Error at '=': Invalid assignment target."
    }
}
