#[macro_use]
mod common;

#[cfg(test)]
mod operator {
    tests! {
        add in operator is OK
        "3"
        "ab"
        "0.75"
    }

    tests! {
        add_mismatch in operator is ERR(70)
        "+: Both operands must be either Numbers or Strings"
        "[line 1]"
    }

    tests! {
        subtract in operator is OK
        "2"
        "-1.5"
    }

    tests! {
        multiply in operator is OK
        "10"
        "0"
    }

    tests! {
        divide in operator is OK
        "4"
        "0.25"
    }

    tests! {
        divide_by_zero in operator is ERR(70)
        "/: Division by zero"
        "[line 1]"
    }

    tests! {
        comparison in operator is OK
        "true"
        "true"
        "false"
        "true"
    }

    tests! {
        comparison_mismatch in operator is ERR(70)
        "<: Operands must be numbers."
        "[line 1]"
    }

    tests! {
        equals in operator is OK
        "true"
        "false"
        "true"
        "true"
        "false"
        "false"
        "true"
    }

    tests! {
        negate in operator is OK
        "-3"
        "3"
    }

    tests! {
        negate_mismatch in operator is ERR(70)
        "-: Operand must be a number."
        "[line 1]"
    }

    tests! {
        not in operator is OK
        "false"
        "true"
        "false"
        "false"
    }
}
