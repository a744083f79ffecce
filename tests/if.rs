#[macro_use]
mod common;

#[cfg(test)]
mod _if {
    tests! {
        then in if is OK
        "then"
        "after"
    }

    tests! {
        else_branch in if is OK
        "else"
    }

    tests! {
        truthiness in if is OK
        "nil falsy"
        "zero truthy"
        "empty truthy"
    }

    tests! {
        dangling_else in if is OK
        "good"
    }
}
