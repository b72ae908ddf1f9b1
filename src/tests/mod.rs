//! Test modules for the replay binary.

mod scenario_tests;
