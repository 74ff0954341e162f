//! Unit and generated tests for the ring buffer.

use std::collections::VecDeque;

use proptest::{
    collection::vec,
    prelude::{Strategy, prop_oneof},
    test_runner::{
        Config as ProptestConfig,
        RngAlgorithm,
        TestCaseError,
        TestRng,
        TestRunner,
    },
    prop_assert,
    prop_assert_eq,
};
use rstest::rstest;

use super::*;

#[test]
#[should_panic(expected = "capacity must be non-zero")]
fn zero_capacity_is_rejected() { let _ = RingBuffer::<u8>::new(0); }

#[test]
fn boundary_write_succeeds_and_one_past_fails() {
    let mut buffer = RingBuffer::<u8>::new(8);
    buffer.write(&[1, 2, 3, 4, 5]).expect("5 of 8 fits");
    buffer.read(3).expect("3 of 5 is available");

    assert_eq!(buffer.available_write(), 6);
    buffer.write(&[6, 7, 8, 9, 10, 11]).expect("exactly 6 fits");
    assert_eq!(
        buffer.write(&[12]),
        Err(BufferError::Full {
            requested: 1,
            available: 0,
        })
    );
}

#[test]
fn overfull_write_fails_without_writing() {
    let mut buffer = RingBuffer::<u8>::new(8);
    buffer.write(&[1, 2, 3, 4, 5]).expect("5 of 8 fits");
    buffer.read(3).expect("3 of 5 is available");

    assert_eq!(
        buffer.write(&[0; 7]),
        Err(BufferError::Full {
            requested: 7,
            available: 6,
        })
    );
    // The failed write left the readable region untouched.
    assert_eq!(buffer.read(2), Ok(vec![4, 5]));
}

#[test]
fn distance_to_finds_the_first_unread_match() {
    let mut buffer = RingBuffer::<u8>::new(8);
    buffer.write(&[10, 20, 30, 40]).expect("write fits");

    assert_eq!(buffer.distance_to(&30), Some(2));
    assert_eq!(buffer.distance_to(&99), None);
}

#[test]
fn distance_to_ignores_consumed_elements() {
    let mut buffer = RingBuffer::<u8>::new(8);
    buffer.write(&[10, 20, 30, 40]).expect("write fits");
    buffer.read(2).expect("2 of 4 is available");

    assert_eq!(buffer.distance_to(&10), None);
    assert_eq!(buffer.distance_to(&40), Some(1));
}

#[test]
fn writes_and_reads_wrap_around_the_backing_store() {
    let mut buffer = RingBuffer::<u8>::new(4);
    buffer.write(&[1, 2, 3]).expect("write fits");
    assert_eq!(buffer.read(3), Ok(vec![1, 2, 3]));

    // Next write spans the end of the backing store.
    buffer.write(&[4, 5, 6]).expect("write fits");
    assert_eq!(buffer.distance_to(&6), Some(2));
    assert_eq!(buffer.read(3), Ok(vec![4, 5, 6]));
}

#[test]
fn peek_does_not_consume() {
    let mut buffer = RingBuffer::<u8>::new(8);
    buffer.write(&[7, 8, 9]).expect("write fits");

    assert_eq!(buffer.peek(2), Ok(vec![7, 8]));
    assert_eq!(buffer.peek_one(), Some(7));
    assert_eq!(buffer.available_read(), 3);
    assert_eq!(buffer.read(3), Ok(vec![7, 8, 9]));
}

#[test]
fn peek_one_on_an_empty_buffer_is_none() {
    let buffer = RingBuffer::<u8>::new(4);
    assert_eq!(buffer.peek_one(), None);
}

#[rstest]
#[case(4, 3)]
#[case(1, 0)]
fn reading_more_than_available_fails(#[case] requested: usize, #[case] written: usize) {
    let mut buffer = RingBuffer::<u8>::new(8);
    buffer.write(&vec![0; written]).expect("write fits");

    let expected = Err(BufferError::InsufficientData {
        requested,
        available: written,
    });
    assert_eq!(buffer.peek(requested), expected);
    assert_eq!(buffer.read(requested), expected);
}

#[test]
fn positive_seek_commits_immediately() {
    let mut buffer = RingBuffer::<u8>::new(8);
    buffer.write(&[1, 2, 3, 4, 5]).expect("write fits");

    assert_eq!(buffer.seek(2), 0);
    assert_eq!(buffer.available_read(), 3);
    assert_eq!(buffer.read(1), Ok(vec![3]));
}

#[test]
fn positive_seek_clamps_to_the_readable_region() {
    let mut buffer = RingBuffer::<u8>::new(8);
    buffer.write(&[1, 2, 3]).expect("write fits");

    assert_eq!(buffer.seek(100), 0);
    assert_eq!(buffer.available_read(), 0);
    assert_eq!(buffer.available_write(), 8);
}

#[test]
fn rewind_clamps_to_what_was_actually_read() {
    let mut buffer = RingBuffer::<u8>::new(8);
    buffer.write(&[1, 2, 3, 4]).expect("write fits");
    buffer.read(4).expect("4 of 4 is available");

    assert_eq!(buffer.seek(-1000), -4);
    assert_eq!(buffer.read(4), Ok(vec![1, 2, 3, 4]));
}

#[test]
fn rewind_then_partial_read_keeps_the_rest_rewound() {
    let mut buffer = RingBuffer::<u8>::new(8);
    buffer.write(&[1, 2, 3, 4]).expect("write fits");
    buffer.read(4).expect("4 of 4 is available");

    assert_eq!(buffer.seek(-3), -3);
    assert_eq!(buffer.read(2), Ok(vec![2, 3]));
    assert_eq!(buffer.seek_offset(), -1);
    assert_eq!(buffer.read(1), Ok(vec![4]));
    assert_eq!(buffer.seek_offset(), 0);
}

#[test]
fn new_writes_clamp_a_rewind_over_overwritten_space() {
    let mut buffer = RingBuffer::<u8>::new(4);
    buffer.write(&[1, 2, 3, 4]).expect("write fits");
    buffer.read(4).expect("4 of 4 is available");
    assert_eq!(buffer.seek(-4), -4);

    // Overwrites the two oldest elements, so only two remain rewindable.
    buffer.write(&[5, 6]).expect("write fits");
    assert_eq!(buffer.seek_offset(), -2);
    assert_eq!(buffer.read(4), Ok(vec![3, 4, 5, 6]));
}

#[test]
fn forward_seek_then_rewind_returns_the_clamped_offset() {
    let mut buffer = RingBuffer::<u8>::new(8);
    buffer.write(&[1, 2, 3]).expect("write fits");

    assert_eq!(buffer.seek(3), 0);
    assert_eq!(buffer.seek(-2), -2);
    assert_eq!(buffer.seek(1), -1);
    assert_eq!(buffer.peek_one(), Some(3));
}

/// Generated sequences of writes, reads, and forward seeks, checked against
/// a queue model. Without rewinds, the free and readable regions always
/// partition the capacity exactly.
#[derive(Clone, Debug)]
enum Op {
    Write(Vec<u8>),
    Read(usize),
    Skip(usize),
}

fn op_strategy(capacity: usize) -> impl Strategy<Value = Op> {
    prop_oneof![
        vec(proptest::prelude::any::<u8>(), 0..=capacity).prop_map(Op::Write),
        (0..=capacity).prop_map(Op::Read),
        (0..=capacity).prop_map(Op::Skip),
    ]
}

fn deterministic_runner(cases: u32) -> TestRunner {
    let config = ProptestConfig {
        cases,
        ..ProptestConfig::default()
    };
    let rng = TestRng::deterministic_rng(RngAlgorithm::ChaCha);
    TestRunner::new_with_rng(config, rng)
}

#[rstest]
#[case(8, 128)]
#[case(32, 96)]
fn generated_op_sequences_preserve_the_capacity_invariant(
    #[case] capacity: usize,
    #[case] cases: u32,
) {
    let mut runner = deterministic_runner(cases);
    let strategy = vec(op_strategy(capacity), 1..32);

    runner
        .run(&strategy, |ops| {
            let mut buffer = RingBuffer::<u8>::new(capacity);
            let mut model: VecDeque<u8> = VecDeque::new();

            for op in ops {
                match op {
                    Op::Write(data) => {
                        let fits = data.len() <= capacity - model.len();
                        let result = buffer.write(&data);
                        if fits {
                            prop_assert_eq!(result, Ok(()));
                            model.extend(data.iter().copied());
                        } else {
                            prop_assert!(
                                matches!(result, Err(BufferError::Full { .. })),
                                "expected BufferError::Full, got {:?}",
                                result
                            );
                        }
                    }
                    Op::Read(amount) => {
                        let result = buffer.read(amount);
                        if amount <= model.len() {
                            let expected: Vec<u8> = model.drain(..amount).collect();
                            prop_assert_eq!(result, Ok(expected));
                        } else {
                            prop_assert!(
                                matches!(result, Err(BufferError::InsufficientData { .. })),
                                "expected BufferError::InsufficientData, got {:?}",
                                result
                            );
                        }
                    }
                    Op::Skip(amount) => {
                        let skipped = amount.min(model.len());
                        model.drain(..skipped);
                        prop_assert_eq!(
                            buffer.seek(to_isize(amount)),
                            0,
                            "forward seeks always commit fully"
                        );
                    }
                }

                prop_assert_eq!(buffer.available_read(), model.len());
                prop_assert_eq!(
                    buffer.available_write() + buffer.available_read(),
                    capacity
                );
                prop_assert_eq!(buffer.peek_one(), model.front().copied());
            }
            Ok(())
        })
        .expect("generated op sequences should uphold the capacity invariant");
}

#[test]
fn generated_sequences_round_trip_through_distance_to() {
    let mut runner = deterministic_runner(64);
    let strategy = vec(proptest::prelude::any::<u8>(), 1..64);

    runner
        .run(&strategy, |data| {
            let mut buffer = RingBuffer::<u8>::new(64);
            buffer
                .write(&data)
                .map_err(|err| TestCaseError::fail(format!("write failed: {err}")))?;

            let target = data[data.len() - 1];
            let expected = data.iter().position(|&byte| byte == target);
            prop_assert_eq!(buffer.distance_to(&target), expected);
            Ok(())
        })
        .expect("distance_to should match a linear scan of the model");
}
