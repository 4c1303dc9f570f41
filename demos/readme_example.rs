extern crate dense_index;
use dense_index::DenseIndex;

fn main() {
    let mut positions = DenseIndex::new();
    *positions.ensure(17) = (1.0, 2.0);
    *positions.ensure(1 << 40) = (3.0, 4.0);
    *positions.ensure(90210) = (5.0, 6.0);

    positions.remove(1 << 40);

    if positions.get(1 << 40).is_none() {
        println!("Id {} is not in the index", 1u64 << 40);
    }

    // Prints the two remaining positions
    for (id, (x, y)) in positions.iter() {
        println!("{id}: ({x}, {y})");
    }

    // Reuses the recycled slot, the capacity stays at 3
    positions.ensure(1 << 40);
    println!("{} alive out of {} slots", positions.count(), positions.capacity());
}
