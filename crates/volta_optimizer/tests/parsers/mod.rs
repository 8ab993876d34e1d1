mod schneider_tests;
