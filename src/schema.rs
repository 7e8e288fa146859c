diesel::table! {
    run (id) {
        id -> Integer,
        test_name -> Text,
        time_start -> Timestamp,
        time_end -> Timestamp,
        duration -> Double,
    }
}
