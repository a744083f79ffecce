#[macro_use]
mod common;

#[cfg(test)]
mod logical_operator {
    tests! {
        values in logical_operator is OK
        "2"
        "nil"
        "1"
        "fallback"
        "false"
    }

    tests! {
        short_circuit in logical_operator is OK
        "before"
        "before"
    }
}
