use std::{env, process};

use pandora_core::{
    error::Error,
    session::{Session, SessionConfig},
};

fn main() {
    env_logger::init();

    let username = env::var("PANDORA_USERNAME").unwrap_or_default();
    let password = env::var("PANDORA_PASSWORD").unwrap_or_default();
    if username.is_empty() || password.is_empty() {
        eprintln!("PANDORA_USERNAME and PANDORA_PASSWORD must be set");
        process::exit(2);
    }

    if let Err(err) = run(&username, &password) {
        log::error!("{}", err);
        eprintln!("error: {}", err);
        process::exit(1);
    }
}

fn run(username: &str, password: &str) -> Result<(), Error> {
    let mut session = Session::new(SessionConfig::default());
    session.connect(username, password)?;

    let stations = session.get_stations()?.to_vec();
    for station in &stations {
        println!("{}  {}", station.id, station.name);
    }

    if let Some(first) = stations.first() {
        println!("--- {} ---", first.name);
        for song in session.get_playlist(&first.id)? {
            println!("{} - {}", song.artist, song.title);
        }
    }

    Ok(())
}
