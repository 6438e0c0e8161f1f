use coursework::{
    control,
    library::{BookShelf, StudentDirectory},
    words,
};

fn main() -> std::io::Result<()> {
    println!("The first ten primes are: {:?}", control::ten_primes());

    for line in BookShelf::favorites().first_three() {
        println!("{line}");
    }

    println!("All students:");
    for name in StudentDirectory::seeded().names() {
        println!("{name}");
    }

    for arg in std::env::args().skip(1) {
        println!("{}", words::describe(&arg)?);
    }

    Ok(())
}
