use clap::Parser;

#[derive(Parser, Clone, Debug)]
pub struct FeedbackOptions {
    #[clap(long)]
    pub user_id: String,

    #[clap(long)]
    pub device_id: String,

    #[clap(long)]
    pub suggestion: String,
}
