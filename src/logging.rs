//! Logging shim.
//!
//! `defmt` on deeply embedded targets, `log` on hosted ones, and silence
//! when neither feature is on.  The poll path never logs; only structural
//! registry changes do.

cfg_if::cfg_if! {
    if #[cfg(feature = "defmt")] {
        #[allow(unused_imports)]
        pub(crate) use defmt::debug;
    } else if #[cfg(feature = "log")] {
        #[allow(unused_imports)]
        pub(crate) use log::debug;
    } else {
        macro_rules! debug {
            ($($arg:tt)*) => {
                { let _ = ($($arg)*); }
            };
        }
        #[allow(unused_imports)]
        pub(crate) use debug;
    }
}
