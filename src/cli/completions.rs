use clap::Parser;
use clap_complete::Shell;

/// Arguments for completions command
#[derive(Parser, Debug, PartialEq, Eq)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    pbundle completions bash > ~/.bash_completion.d/pbundle\n\n\
                  Generate zsh completions:\n    pbundle completions zsh > ~/.zfunc/_pbundle\n\n\
                  Generate fish completions:\n    pbundle completions fish > ~/.config/fish/completions/pbundle.fish")]
pub struct CompletionsArgs {
    /// Shell type
    #[arg(value_enum, ignore_case = true)]
    pub shell: Shell,
}
