use itertools::Itertools;

use crate::Command;

/// A pipeline allows multiple programs to be connected using "pipes", sending
/// one program's output as input for another program.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pipeline {
    /// Whether or not to execute the pipeline in the background.
    ///
    /// Background pipelines are not waited for when executed.
    pub background: bool,

    /// Individual pipeline stages arranged such that the `n`-th stage writes
    /// its output to the input of the `(n+1)`-th stage. The first stage reads
    /// its input from the standard input file descriptor, and the last stage
    /// writes its output to the standard output file descriptor.
    pub stages: Vec<Command>,
}

impl Pipeline {
    /// Returns `true` if there is nothing to execute.
    ///
    /// A pipeline whose first stage lacks a program is considered empty.
    pub fn is_empty(&self) -> bool {
        self.stages.first().map_or(true, Command::is_empty)
    }

    /// Returns a human readable representation of the pipeline.
    ///
    /// Redirections are not included, and stages without a program are skipped.
    pub fn command_line(&self) -> String {
        self.stages
            .iter()
            .filter(|stage| !stage.is_empty())
            .join(" | ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipelines_without_stages_are_empty() {
        assert!(Pipeline::default().is_empty());
    }

    #[test]
    fn pipelines_with_an_empty_first_stage_are_empty() {
        let pipeline = Pipeline {
            background: false,
            stages: vec![Command::default(), Command::new(["cat"])],
        };
        assert!(pipeline.is_empty());
    }

    #[test]
    fn command_line_joins_stages_with_pipes() {
        let mut sort = Command::new(["sort", "-r"]);
        sort.write_to("out.txt", false);
        let pipeline = Pipeline {
            background: true,
            stages: vec![Command::new(["cat", "a.txt"]), sort, Command::new(["wc", "-l"])],
        };
        assert_eq!(pipeline.command_line(), "cat a.txt | sort -r | wc -l");
    }
}
