//! Declarative parallel/sequential execution utilities.
//!
//! The `cfg` logic for the `parallel` (rayon) feature lives here in ONE
//! place, keeping call sites clean. Every helper accepts a
//! `force_sequential` override so callers can profile or pin down
//! nondeterministic scheduling at runtime.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Map a fallible function over a slice, potentially in parallel.
///
/// Short-circuits on the first error. On success, results are in input
/// order regardless of evaluation order.
///
/// # Parameters
/// - `force_sequential`: when true, runs sequentially even if the
///   `parallel` feature is enabled
#[inline]
pub fn try_map_slice<T, F, R, E>(
    slice: &[T],
    f: F,
    force_sequential: bool,
) -> Result<Vec<R>, E>
where
    T: Sync,
    F: Fn(&T) -> Result<R, E> + Sync + Send,
    R: Send,
    E: Send,
{
    #[cfg(feature = "parallel")]
    {
        if force_sequential {
            slice.iter().map(f).collect()
        } else {
            slice.par_iter().map(f).collect()
        }
    }

    #[cfg(not(feature = "parallel"))]
    {
        let _ = force_sequential;
        slice.iter().map(f).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_map_slice_preserves_order() {
        let input: Vec<u64> = (0..1000).collect();
        let doubled: Vec<u64> =
            try_map_slice(&input, |x| Ok::<u64, String>(x * 2), false).unwrap();
        assert_eq!(doubled.len(), 1000);
        for (i, v) in doubled.iter().enumerate() {
            assert_eq!(*v, i as u64 * 2);
        }
    }

    #[test]
    fn test_try_map_slice_forced_sequential_matches() {
        let input: Vec<u64> = (0..100).collect();
        let parallel: Result<Vec<u64>, String> = try_map_slice(&input, |x| Ok(x + 1), false);
        let sequential: Result<Vec<u64>, String> = try_map_slice(&input, |x| Ok(x + 1), true);
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_try_map_slice_ok() {
        let input: Vec<i32> = (0..100).collect();
        let result: Result<Vec<i32>, String> = try_map_slice(&input, |x| Ok(x * x), false);
        let values = result.unwrap();
        assert_eq!(values[9], 81);
        assert_eq!(values.len(), 100);
    }

    #[test]
    fn test_try_map_slice_propagates_error() {
        let input: Vec<i32> = (0..100).collect();
        let result: Result<Vec<i32>, String> = try_map_slice(
            &input,
            |x| {
                if *x == 42 {
                    Err("bad input".to_string())
                } else {
                    Ok(*x)
                }
            },
            false,
        );
        assert_eq!(result, Err("bad input".to_string()));
    }

    #[test]
    fn test_try_map_slice_empty() {
        let input: Vec<i32> = Vec::new();
        let result: Result<Vec<i32>, String> = try_map_slice(&input, |x| Ok(*x), false);
        assert_eq!(result.unwrap(), Vec::<i32>::new());
    }
}
