#[macro_use]
mod common;

#[cfg(test)]
mod variable {
    tests! {
        define in variable is OK
        "1"
        "nil"
    }

    tests! {
        shadowing in variable is OK
        "block"
        "global"
    }

    tests! {
        enclosing_assign in variable is OK
        "2"
    }

    tests! {
        undefined_global in variable is ERR(70)
        "missing: Undefined variable 'missing'."
        "[line 1]"
    }

    tests! {
        use_in_own_initializer in variable is ERR(65)
        "[line 2] Error at 'a': Can't read local variable in its own initializer."
    }

    tests! {
        duplicate_local in variable is ERR(65)
        "[line 3] Error at 'a': A variable with this name is already defined in this scope."
    }

    tests! {
        redeclare_global in variable is OK
        "2"
    }

    tests! {
        unused_local_still_runs in variable is OK
        "done"
    }
}
