mod cycle_tests;
