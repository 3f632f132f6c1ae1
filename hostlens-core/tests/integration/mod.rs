mod collector_tests;
mod mock_gateway;
