use argh::FromArgs;
use line_commands::{CommandTable, Interpreter};
use std::collections::BTreeMap;

#[derive(FromArgs)]
/// Interactive demo of the line_commands interpreter.
struct Args {
    #[argh(option, default = "String::from(\">>> \")")]
    /// prompt shown before each command.
    prompt: String,

    #[argh(option, default = "255")]
    /// how many successful commands `hist` remembers.
    history_size: usize,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args: Args = argh::from_env();

    let mut cli = Interpreter::new(commands(), args.prompt, args.history_size);
    cli.info("Type help ...\n")?;
    cli.repl()?;
    Ok(())
}

fn commands() -> CommandTable {
    CommandTable::new()
        .with("help", help)
        .with("greet", greet)
        .with("secret", secret)
        .with("menu", menu)
        .with("exit", exit)
}

const HELP: &str = "
help            this text
greet <name>    greets <name>
secret          enter a secret - no echo
menu            pick a flavour from a menu
hist            show history of commands (builtin)
run <index>     run the command with <index> in history (builtin)
exit            exit program

";

fn help(cli: &mut Interpreter, _args: &[&str]) -> anyhow::Result<()> {
    cli.info(HELP)?;
    Ok(())
}

#[derive(FromArgs)]
/// Say hello.
struct Greet {
    #[argh(positional)]
    /// who to greet.
    name: Option<String>,
}

fn greet(cli: &mut Interpreter, args: &[&str]) -> anyhow::Result<()> {
    match Greet::from_args(&args[..1], &args[1..]) {
        Ok(Greet { name: Some(name) }) => cli.info(format_args!("Hello {name}\n"))?,
        _ => cli.info("Usage: greet <name>\n")?,
    }
    Ok(())
}

fn secret(cli: &mut Interpreter, _args: &[&str]) -> anyhow::Result<()> {
    let secret = cli.read_secret("Enter your Secret: ")?;
    cli.info(format_args!("Your Secret is: {secret}\n"))?;
    Ok(())
}

fn menu(cli: &mut Interpreter, _args: &[&str]) -> anyhow::Result<()> {
    let items = BTreeMap::from([
        ("c", "chocolate"),
        ("s", "strawberry"),
        ("v", "vanilla"),
    ]);
    let key = cli.choice(&items)?;
    cli.info(format_args!("You picked {}\n", items[key.as_str()]))?;
    Ok(())
}

fn exit(cli: &mut Interpreter, _args: &[&str]) -> anyhow::Result<()> {
    if cli.yes_no("Are you sure? (y)es/(n)o", &["y"])? {
        cli.request_exit();
    }
    Ok(())
}
