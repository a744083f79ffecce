#[macro_use]
mod common;

#[cfg(test)]
mod function {
    tests! {
        declaration in function is OK
        "<fn f>"
        "body"
    }

    tests! {
        parameters in function is OK
        "3"
        "xy"
    }

    tests! {
        return_value in function is OK
        "7"
    }

    tests! {
        return_nil in function is OK
        "nil"
    }

    tests! {
        implicit_nil in function is OK
        "nil"
    }

    tests! {
        recursion in function is OK
        "55"
    }

    tests! {
        anonymous in function is OK
        "42"
        "<anonymous fn>"
    }

    tests! {
        higher_order in function is OK
        "42"
    }

    tests! {
        wrong_arity in function is ERR(70)
        "): Expected 1 arguments but got 2."
        "[line 2]"
    }

    tests! {
        call_non_callable in function is ERR(70)
        "): Can only call functions and classes."
        "[line 1]"
    }

    tests! {
        return_top_level in function is ERR(65)
        "[line 1] Error at 'return': Can't return from top-level code."
    }

    tests! {
        native_clock in function is OK
        "true"
        "true"
    }
}
