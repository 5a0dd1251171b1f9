use libmodal_core::{add_two_numbers, catch_boundary, checked_add, BoundaryStatus};
use std::sync::{Arc, Barrier};
use std::thread;

const THREADS: usize = 64;
const CALLS_PER_THREAD: i32 = 1_000;

#[test]
fn concurrent_guarded_adds_are_independent() {
    let barrier = Arc::new(Barrier::new(THREADS));
    let handles = (0..THREADS)
        .map(|index| {
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let x = index as i32 * 1_000_003;
                barrier.wait();
                let mut observed = Vec::with_capacity(CALLS_PER_THREAD as usize);
                for y in 0..CALLS_PER_THREAD {
                    observed.push(catch_boundary("concurrent_add", i32::MIN, || {
                        add_two_numbers(x, y)
                    }));
                }
                (x, observed)
            })
        })
        .collect::<Vec<_>>();

    for handle in handles {
        let (x, observed) = handle.join().expect("worker thread should not panic");
        for (y, sum) in observed.into_iter().enumerate() {
            assert_eq!(sum, x + y as i32);
        }
    }
}

#[test]
fn concurrent_overflow_policy_is_deterministic() {
    let handles = (0..THREADS)
        .map(|index| {
            thread::spawn(move || {
                let y = index as i32 + 1;
                let wrapped = add_two_numbers(i32::MAX, y);
                let checked = checked_add(i32::MAX, y).map_err(BoundaryStatus::from);
                (y, wrapped, checked)
            })
        })
        .collect::<Vec<_>>();

    for handle in handles {
        let (y, wrapped, checked) = handle.join().expect("worker thread should not panic");
        assert_eq!(wrapped, i32::MIN + (y - 1));
        assert_eq!(checked, Err(BoundaryStatus::Overflow));
    }
}

#[test]
fn concurrent_panics_are_contained_per_call() {
    let handles = (0..THREADS)
        .map(|index| {
            thread::spawn(move || {
                catch_boundary("concurrent_panic", -1, || {
                    if index % 2 == 0 {
                        panic!("worker {index} failed");
                    }
                    index as i32
                })
            })
        })
        .collect::<Vec<_>>();

    for (index, handle) in handles.into_iter().enumerate() {
        let value = handle.join().expect("guard must not let panics escape");
        if index % 2 == 0 {
            assert_eq!(value, -1);
        } else {
            assert_eq!(value, index as i32);
        }
    }
}
