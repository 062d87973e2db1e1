use clap::{Parser, Subcommand};
use game_collection::{
    browser::{
        render_filter_options, render_games, render_stats, FilterOptions, GameClient, GameForm,
    },
    library::GameFilter,
    Status, Tracing,
};
use std::io::Write;
use tracing::info;

/// Browses and edits the game collection served by `http_server`.
#[derive(Parser)]
struct Opts {
    /// Root URL of the game collection API.
    #[clap(long, default_value = "http://localhost:7000/api")]
    api_url: String,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Shows the collection, optionally narrowed by filters.
    List {
        #[clap(long)]
        genre: Option<String>,

        #[clap(long)]
        platform: Option<String>,

        #[clap(long)]
        completed: Option<bool>,

        #[clap(long)]
        favorite: Option<bool>,
    },

    /// Adds a game to the collection.
    Add(GameForm),

    /// Flips the favorite flag of a game.
    Favorite { id: String },

    /// Removes a game from the collection.
    Delete {
        id: String,

        /// Skip the confirmation prompt.
        #[clap(long)]
        yes: bool,
    },

    /// Shows collection statistics.
    Stats,

    /// Downloads the full collection as JSON.
    Export {
        #[clap(long, default_value = "games.json")]
        output: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Status> {
    let opts: Opts = Opts::parse();
    Tracing::setup("game-browser")?;

    let client = GameClient::new(opts.api_url);

    match opts.command {
        Command::List {
            genre,
            platform,
            completed,
            favorite,
        } => {
            let filter = GameFilter {
                genre,
                platform,
                completed,
                favorite,
            };
            refresh(&client, &filter).await?;
        }
        Command::Add(form) => {
            let new_game = form.into_new_game()?;
            let game = client.create(&new_game).await?;
            info!("added {game}");
            refresh(&client, &GameFilter::default()).await?;
        }
        Command::Favorite { id } => {
            let game = client.toggle_favorite(&id).await?;
            info!("{game} favorite: {}", game.favorite);
            refresh(&client, &GameFilter::default()).await?;
        }
        Command::Delete { id, yes } => {
            if !yes && !confirm(&format!("Delete game '{id}'?"))? {
                return Ok(());
            }
            let resp = client.delete(&id).await?;
            info!("{}", resp.message);
            refresh(&client, &GameFilter::default()).await?;
        }
        Command::Stats => println!("{}", render_stats(&client.stats().await?)),
        Command::Export { output } => {
            let export = client.export().await?;
            std::fs::write(&output, export)?;
            info!("exported collection to '{output}'");
        }
    }

    Ok(())
}

/// Loads the collection and stats and prints both.
async fn refresh(client: &GameClient, filter: &GameFilter) -> Result<(), Status> {
    let list = client.list(filter).await?;
    let stats = client.stats().await?;

    println!("{}\n", render_stats(&stats));
    println!(
        "{}\n",
        render_filter_options(&FilterOptions::from_games(&list.games))
    );
    print!("{}", render_games(&list.games));
    println!("{} game(s)", list.count);
    Ok(())
}

fn confirm(question: &str) -> Result<bool, Status> {
    print!("{question} [y/N] ");
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
