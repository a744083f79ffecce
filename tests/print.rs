#[macro_use]
mod common;

#[cfg(test)]
mod print {
    tests! {
        literals in print is OK
        "nil"
        "true"
        "false"
        "123"
        "1.5"
        "text"
    }

    tests! {
        number_formatting in print is OK
        "3"
        "2.5"
        "100"
        "0"
    }
}
