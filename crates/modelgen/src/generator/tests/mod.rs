pub(crate) mod support;

mod partition_tests;
