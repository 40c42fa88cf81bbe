#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandLineConfig {
    pub script: Option<String>,
    pub command: String,
    pub verbose: bool,
}

impl CommandLineConfig {
    pub fn from_args(args: &[&str]) -> Result<Self, String> {
        let mut script = None;
        let mut command = String::from("status");
        let mut verbose = false;
        let mut iter = args.iter().skip(1);
        while let Some(arg) = iter.next() {
            match *arg {
                "--script" => {
                    script = Some(
                        iter.next()
                            .ok_or_else(|| "--script requires a value".to_string())?
                            .to_string(),
                    );
                }
                "--command" => {
                    command = iter
                        .next()
                        .ok_or_else(|| "--command requires a value".to_string())?
                        .to_string();
                }
                "-v" | "--verbose" => verbose = true,
                other if other.starts_with('-') => {
                    return Err(format!("unknown flag {other}"));
                }
                _ => {
                    command = arg.to_string();
                }
            }
        }
        Ok(Self {
            script,
            command,
            verbose,
        })
    }

    pub fn help() -> &'static str {
        "Usage: casgraph [--script PATH] [--command status|list|adjacency|edges|check|snapshot] [--verbose]\n"
    }
}
