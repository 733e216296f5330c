use booking_engine::cli::{self, Args};
use booking_engine::{Config, init_logger_with_file, print_banner};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    // 1. 设置环境 (dotenv, 日志)
    dotenv::dotenv().ok();
    let args = Args::parse();
    let config = Config::from_env();
    init_logger_with_file(&config.log_level, config.log_json, config.log_dir.as_deref())?;

    if args.banner {
        print_banner();
    }

    // 2. 读取输入，重新计算并输出
    let input = cli::read_input(args.file.as_deref())?;
    cli::run(&args, &config, &input, &mut std::io::stdout().lock())
}
