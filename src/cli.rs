// CLI argument definitions. One positional target plus the two output
// flags; everything else about an invocation is fixed.

use clap::Parser;

/// Upload a file or a remote URL to Catbox and print the shareable link.
#[derive(Debug, Parser)]
#[command(name = "catbox-cli", version, about)]
pub struct Cli {
    /// File path or URL to upload.
    pub target: String,

    /// Copy the resulting link to the system clipboard.
    #[arg(long)]
    pub copy: bool,

    /// Print a single machine-readable JSON object instead of
    /// human-oriented output.
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_default_to_off() {
        let args = Cli::parse_from(["catbox-cli", "photo.png"]);
        assert_eq!(args.target, "photo.png");
        assert!(!args.copy);
        assert!(!args.json);
    }
}
