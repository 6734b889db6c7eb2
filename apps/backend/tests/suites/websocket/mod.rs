pub mod error_handling_tests;
