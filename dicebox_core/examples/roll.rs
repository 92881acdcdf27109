use dicebox_core::{roll_many, roll_one};

fn main() {
    // Example end-to-end batch roll
    let single = roll_one(1, 6);
    println!("single roll: {single}");

    let batch = roll_many(20).expect("positive count");
    for (face, count) in batch.faces.iter() {
        println!("face {face}: {count}");
    }
    println!("most frequent: {}", batch.faces.most_frequent());
}
