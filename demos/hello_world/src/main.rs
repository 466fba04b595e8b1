use lazytree::SegmentTree;
use log::info;

fn main() {
    // Forward `log` records from lazytree; set RUST_LOG=trace to follow propagation
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let nums: [i32; 10] = [1, 4, 3, 6, 7, 5, 2, 0, 9, 8];
    // Build the tree over a copy of the array
    let mut tree = SegmentTree::new(&nums).expect("non-empty input");

    let sum = tree.range_sum(1..=7).expect("range within bounds");
    assert_eq!(sum, 27);
    assert_eq!(tree.range_min(1..=7), Ok(0));
    info!("sum of 1..=7 is {sum}");

    // Point assignment through a range of length one
    tree.update(2..=2, 5).expect("range within bounds");
    let sum = tree.range_sum(1..=7).expect("range within bounds");
    assert_eq!(sum, 29);
    info!("after assigning 5 to position 2 the sum of 1..=7 is {sum}");

    // Assign the whole array lazily; only the root is touched
    tree.update(.., 1).expect("range within bounds");
    assert_eq!(tree.range_sum(3..6), Ok(3));

    // Overwrite a sub-range, which pushes the root's pending value down
    tree.update(4..=8, 9).expect("range within bounds");
    assert_eq!(tree.range_min(..), Ok(1));
    assert_eq!(tree.range_sum(..), Ok(50));

    // Invalid ranges are rejected and leave the tree untouched
    if let Err(err) = tree.update(5..=10, 0) {
        info!("rejected update: {err}");
    }

    println!("{:?}", tree);
    println!("{:?}", tree.to_vec());

    #[cfg(feature = "profiler")]
    println!("{:#?}", tree.stats());
}
