// Copyright (c) The patchgrade Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use indoc::indoc;
use std::sync::Once;

pub(crate) const DJANGO_ID: &str = "django__django-11099";
pub(crate) const SYMPY_ID: &str = "sympy__sympy-20590";
pub(crate) const SMITH_ID: &str = "pandas-dev__pandas.95b0fa2b.func_pm_op_swap";

pub(crate) const PATCH: &str = indoc! {"
    diff --git a/django/contrib/auth/validators.py b/django/contrib/auth/validators.py
    --- a/django/contrib/auth/validators.py
    +++ b/django/contrib/auth/validators.py
    @@ -7,7 +7,7 @@
    -    regex = r'^[\\w.@+-]+$'
    +    regex = r'\\A[\\w.@+-]+\\Z'
"};

/// A Django run: baseline output before the prediction is applied, then the real run.
pub(crate) const DJANGO_LOG: &str = indoc! {"
    + git checkout d26b2424437dabeeca94d7900b37d2df4410da0c
    >>>>> Applied Patch (test)
    test_ascii_validator (auth_tests.test_validators.UsernameValidatorsTests) ... FAIL
    test_unicode_validator (auth_tests.test_validators.UsernameValidatorsTests) ... FAIL
    >>>>> Applied Patch (pred)
    Testing against Django installed in '/testbed/django'
    Importing application auth_tests
    test_ascii_validator (auth_tests.test_validators.UsernameValidatorsTests) ... ok
    test_unicode_validator (auth_tests.test_validators.UsernameValidatorsTests) ... ok
    test_help_text (auth_tests.test_validators.UserAttributeSimilarityValidatorTest) ... ok
    test_validate_property (auth_tests.test_validators.UserAttributeSimilarityValidatorTest) ... skipped 'needs db'

    ----------------------------------------------------------------------
    Ran 4 tests in 0.112s

    OK (skipped=1)
"};

/// A Sympy run where one test fails and is reported in a banner block.
pub(crate) const SYMPY_LOG: &str = indoc! {"
    >>>>> Applied Patch (pred)
    ============================= test process starts ==============================
    executable:         /opt/miniconda3/envs/testbed/bin/python  (3.9.19-final-0) [CPython]
    sympy/core/tests/test_basic.py[3]
    test_structure ok
    test_immutable F
    test_preorder_traversal ok                                                 [FAIL]

    ________________________________________________________________________________
    ______________ sympy/core/tests/test_basic.py:test_immutable _______________
    Traceback (most recent call last):
      File \"/testbed/sympy/core/tests/test_basic.py\", line 41, in test_immutable
        assert not hasattr(b1, '__dict__')
    AssertionError
    ============= tests finished: 2 passed, 1 failed, in 0.31 seconds ==============
"};

pub(crate) fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}
