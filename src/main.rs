use anyhow::{bail, Context};
use engine::{Game, GameStatus};
use tracing::info;
use tracing_subscriber::EnvFilter;

// 用法: rs-janggi [--fen <局面串>] [走法...]，例如 rs-janggi a4-b4 a7-b7 a1-a4
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let mut game = Game::new();
    let mut moves = vec![];
    while let Some(arg) = args.next() {
        if arg == "--fen" {
            let fen = args.next().context("--fen 后面缺少局面串")?;
            game = Game::from_fen(&fen).with_context(|| format!("无法加载局面 `{fen}`"))?;
        } else {
            moves.push(arg);
        }
    }

    for m in &moves {
        if game.status().is_over() {
            bail!("对局已结束（{:?}），忽略之后的走法 `{}`", game.status(), m);
        }
        let outcome = game.play(m).with_context(|| format!("第{}步 `{}` 非法", game.counter() + 1, m))?;
        info!("{:?} {} {}", outcome.mv.player, outcome.mv.piece.kind.name_value(), outcome.mv);
    }

    match game.status() {
        GameStatus::InProgress => println!(
            "{:?} 走棋{}",
            game.turn(),
            if game.in_check() { "（被将军）" } else { "" }
        ),
        status => println!("{:?}", status),
    }
    println!("{}", game.to_fen());
    Ok(())
}
