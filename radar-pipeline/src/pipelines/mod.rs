pub mod opportunity_scan;
