pub mod threaded_tracking_worker;
