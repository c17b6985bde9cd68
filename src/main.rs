//! Blobify - encrypt files into innocuous-looking greyscale PNGs.

use blobify::batch::{Mode, Operation};
use blobify::worker::{self, Update};
use blobify::Result;
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "blobify")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Encrypt files into greyscale PNG containers",
    long_about = "Encrypts files or whole directory trees with AES-256-GCM under a password-derived key and hides the result in the pixel data of greyscale PNG images."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a file or directory into PNG containers
    Encrypt {
        /// File or directory to encrypt
        source: PathBuf,

        /// Directory under which encrypted_output/ is created
        #[arg(long, default_value = ".")]
        output: PathBuf,

        /// Skip the confirmation prompt before the output directory is replaced
        #[arg(long)]
        force: bool,
    },

    /// Decrypt PNG containers back into the original files
    Decrypt {
        /// Encrypted PNG or directory of encrypted PNGs
        source: PathBuf,

        /// Directory under which decrypted_output/ is created
        #[arg(long, default_value = ".")]
        output: PathBuf,

        /// Skip the confirmation prompt before the output directory is replaced
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Encrypt {
            source,
            output,
            force,
        } => cmd_run(Mode::Encrypt, source, output, force),

        Commands::Decrypt {
            source,
            output,
            force,
        } => cmd_run(Mode::Decrypt, source, output, force),
    }
}

fn prompt_password(prompt: &str) -> String {
    rpassword::prompt_password(prompt).unwrap_or_else(|_| {
        eprint!("{}", prompt);
        io::stderr().flush().unwrap();
        let mut password = String::new();
        io::stdin().read_line(&mut password).unwrap();
        password.trim().to_string()
    })
}

fn confirm(prompt: &str) -> bool {
    eprint!("{} [y/N] ", prompt);
    io::stderr().flush().unwrap();
    let mut input = String::new();
    io::stdin().read_line(&mut input).unwrap();
    input.trim().eq_ignore_ascii_case("y")
}

fn cmd_run(mode: Mode, source: PathBuf, output: PathBuf, force: bool) -> Result<()> {
    let output_root = output.join(mode.output_dir());
    let non_empty = output_root
        .read_dir()
        .map(|mut entries| entries.next().is_some())
        .unwrap_or(false);

    if non_empty && !force {
        let prompt = format!(
            "Output folder will be deleted and recreated: {}\nContinue?",
            output_root.display()
        );
        if !confirm(&prompt) {
            println!("Aborted");
            return Ok(());
        }
    }

    let password = prompt_password("Password: ");
    if mode == Mode::Encrypt {
        let check = prompt_password("Confirm password: ");
        if password != check {
            eprintln!("Passwords do not match");
            std::process::exit(1);
        }
    }

    let rx = worker::spawn(Operation {
        mode,
        source,
        output_base: output,
        password,
    });

    for update in rx {
        match update {
            Update::Progress(event) => println!("{}", event),
            Update::Finished(Ok(processed)) => {
                println!("Operation completed successfully: {} file(s) processed", processed);
            }
            Update::Finished(Err(e)) => return Err(e),
        }
    }

    Ok(())
}
