#[macro_use]
mod common;

#[cfg(test)]
mod class {
    tests! {
        name in class is OK
        "Foo"
    }

    tests! {
        instance in class is OK
        "Foo instance"
    }

    tests! {
        fields in class is OK
        "42"
        "43"
    }

    tests! {
        undefined_property in class is ERR(70)
        "missing: Undefined property 'missing'."
        "[line 3]"
    }

    tests! {
        method in class is OK
        "hi lox"
    }

    tests! {
        method_value in class is OK
        "<fn bar>"
        "bar"
    }

    tests! {
        bound_method in class is OK
        "1"
        "2"
    }

    tests! {
        get_non_instance in class is ERR(70)
        "length: Only instances have properties."
        "[line 1]"
    }

    tests! {
        set_non_instance in class is ERR(70)
        "x: Only instances have fields."
        "[line 1]"
    }

    tests! {
        state in class is OK
        "true"
        "false"
    }
}
