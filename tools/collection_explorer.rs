// Inspect the persisted collection blob without starting the GUI.
use std::env;
use std::path::PathBuf;

use filmshelf::app::persist;

fn main() {
    let args: Vec<String> = env::args().collect();
    let path = match args.get(1) {
        Some(p) => PathBuf::from(p),
        None => persist::collection_path(),
    };

    println!("Reading collection: {}", path.display());

    let Some(films) = persist::load(&path) else {
        eprintln!("No collection found (missing or unreadable).");
        std::process::exit(1);
    };

    println!("{} films\n", films.len());
    for f in &films {
        let rating = if f.user_rating == 0 {
            "-".to_string()
        } else {
            "★".repeat(f.user_rating as usize)
        };
        println!(
            "{:38} {:32} watched={:5} favorite={:5} rating={:5} notes={:?}",
            f.id, f.title, f.watched, f.favorite, rating, f.notes
        );
    }
}
