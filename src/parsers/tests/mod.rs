mod listing_parser_tests;
