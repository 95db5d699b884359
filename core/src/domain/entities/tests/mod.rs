mod attachment_tests;
mod lease_tests;
mod maintenance_tests;
mod tenant_tests;
