mod dedup_tests;
