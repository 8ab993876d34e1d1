mod ruin_recreate_tests;
