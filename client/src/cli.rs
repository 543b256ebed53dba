use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[clap(author, version)]
#[clap(name = "Self Learning Value Trainer")]
#[clap(about = "Trains a position evaluator by playing games against itself", long_about = None)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    SelfLearn(SelfLearnCommand),
    Play(PlayCommand),
}

#[derive(Args)]
pub struct SelfLearnCommand {
    #[clap(short, long, default_value_t = String::from("client.conf"))]
    pub config: String,
}

#[derive(Args)]
#[clap(about = "Plays one greedy game with the saved checkpoint and prints the final position.", long_about = None)]
pub struct PlayCommand {
    #[clap(short, long, default_value_t = String::from("client.conf"))]
    pub config: String,
}
