#[macro_export]
macro_rules! wrapper {
    // Single expression (like a function name or closure)
    ($f:expr) => {{
        $f()
    }};
    ($f:expr, $( $args:expr $(,)? )* ) => {{
        $f( $($args,)* )
    }};
}

/// Calls the function until it returns Ok, waiting 5, 10 and 20 seconds between attempts.
/// The last result is returned whether it is Ok or not.
#[macro_export]
macro_rules! retry {
    ($( $args:expr$(,)? )+) => {{
        let mut wait: u64 = 5;
        loop {
            let res = $crate::wrapper!($( $args, )*);
            if let Err(e) = &res {
                if wait <= 20 {
                    log::warn!("attempt failed, retrying in {} seconds: {}", wait, e);
                    std::thread::sleep(std::time::Duration::from_secs(wait));
                    wait *= 2;
                    continue;
                }
            }
            break res;
        }
    }};
}
