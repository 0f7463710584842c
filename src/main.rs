use anyhow::bail;
use clap::Parser;
use msgtap::debugger::lldb::LldbSession;
use msgtap::debugger::process::find_processes;
use msgtap::debugger::Debugger;
use msgtap::ui::console::AppBuilder;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Pid of the process to attach to
    pid: Option<u32>,

    /// Attach to the first running process whose executable name
    /// contains this substring
    #[arg(long, conflicts_with = "pid")]
    name: Option<String>,

    /// List attachable processes and exit
    #[arg(long)]
    list: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.list {
        for process in find_processes(args.name.as_deref().unwrap_or_default()) {
            println!(
                "{}\t{} ({})",
                process.pid(),
                process.name(),
                process.exe().display()
            );
        }
        return Ok(());
    }

    let pid = match (args.pid, args.name.as_deref()) {
        (Some(pid), _) => pid,
        (None, Some(name)) => {
            let candidates = find_processes(name);
            let Some(process) = candidates.first() else {
                bail!("no running process with an executable name matching `{name}`");
            };
            if candidates.len() > 1 {
                eprintln!(
                    "WARNING: multiple processes match `{name}`, using {} (pid {})",
                    process.name(),
                    process.pid()
                );
            }
            process.pid()
        }
        (None, None) => bail!("pass a pid or --name of the process to attach to"),
    };

    let session = LldbSession::attach(pid.into())?;
    let debugger = Debugger::new(session);

    let app = AppBuilder::new().build(debugger)?;
    app.run()
}
