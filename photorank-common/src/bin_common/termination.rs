use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use signal_hook::{consts::signal::*, low_level};

/// Counts SIGINT and SIGTERM. The first one asks the program to wrap up, the third one
/// kills it the usual way.
#[derive(Clone, Debug)]
pub struct Interrupt {
    count: Arc<AtomicUsize>,
}

impl Interrupt {
    pub fn register() -> Result<Self, std::io::Error> {
        let count = Arc::new(AtomicUsize::new(0));

        for flag in [SIGINT, SIGTERM] {
            let count = Arc::clone(&count);
            // SAFETY: only atomics and functions from signal-hook that are themselves
            // used inside its signal handlers
            unsafe {
                low_level::register(flag, move || {
                    let prev = count.fetch_add(1, Ordering::SeqCst);
                    if prev >= 2 {
                        let _ = low_level::emulate_default_handler(flag);
                    }
                })?;
            };
        }

        Ok(Self { count })
    }

    /// An interrupt that never fires, for when signals should be left alone.
    pub fn never() -> Self {
        Self {
            count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn is_requested(&self) -> bool {
        self.count.load(Ordering::SeqCst) >= 1
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn never_is_never_requested() {
        let interrupt = Interrupt::never();
        assert!(!interrupt.clone().is_requested());
    }
}
