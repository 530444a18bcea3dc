use clap::{Args, Subcommand};
use compact_str::CompactString;
use gitlab_wrapper::{
    client::{ClientError, GitlabClient},
    domain::NewMergeRequest,
    id::MergeRequestIid,
    result::{Result, WrapperError},
};
use serde::Serialize;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Branch operations
    #[command(subcommand)]
    Branch(BranchCommand),
    /// Tag operations
    #[command(subcommand)]
    Tag(TagCommand),
    /// Merge request operations
    #[command(subcommand)]
    #[command(name = "mr")]
    MergeRequest(MergeRequestCommand),
    /// List the pipelines of a merge request
    Pipelines {
        /// Merge request IID
        iid: u32,
    },
}

#[derive(Subcommand, Debug)]
pub enum BranchCommand {
    List,
    Get { name: String },
    Create {
        name: String,
        /// Branch, tag or commit the new branch starts from
        #[arg(long = "from", value_name = "REF")]
        from: String,
    },
    Delete { name: String },
}

#[derive(Subcommand, Debug)]
pub enum TagCommand {
    Create {
        name: String,
        /// Branch, tag or commit to tag
        #[arg(long = "on", value_name = "REF")]
        on: String,
    },
    Delete { name: String },
}

#[derive(Subcommand, Debug)]
pub enum MergeRequestCommand {
    Create(CreateMergeRequestArgs),
    Delete { iid: u32 },
    Merge { iid: u32 },
}

#[derive(Args, Debug)]
pub struct CreateMergeRequestArgs {
    #[arg(long)]
    source: String,
    #[arg(long)]
    target: String,
    #[arg(long)]
    title: String,
    #[arg(long)]
    description: Option<String>,
    /// Comma separated label names
    #[arg(long)]
    labels: Option<String>,
    #[arg(long)]
    assignee_id: Option<u64>,
    #[arg(long)]
    milestone_id: Option<u64>,
    #[arg(long)]
    remove_source_branch: bool,
    #[arg(long)]
    squash: bool,
}

impl CreateMergeRequestArgs {
    fn into_request(self) -> Result<NewMergeRequest> {
        let mut builder = NewMergeRequest::builder()
            .source_branch(self.source)
            .target_branch(self.target)
            .title(self.title);

        if let Some(description) = self.description {
            builder = builder.description(description);
        }
        if let Some(labels) = self.labels {
            builder = builder.labels(labels);
        }
        if let Some(assignee_id) = self.assignee_id {
            builder = builder.assignee_id(assignee_id);
        }
        if let Some(milestone_id) = self.milestone_id {
            builder = builder.milestone_id(milestone_id);
        }
        if self.remove_source_branch {
            builder = builder.remove_source_branch(true);
        }
        if self.squash {
            builder = builder.squash(true);
        }

        Ok(builder.build().map_err(ClientError::from)?)
    }
}

/// Execute `command`, printing results as JSON on stdout
///
/// Operations that report failure by returning nothing are turned into an
/// error here so the process exits non-zero.
pub fn run(client: &GitlabClient, command: Command) -> Result<()> {
    match command {
        Command::Branch(BranchCommand::List) => print_json(&client.list_branches()),
        Command::Branch(BranchCommand::Get { name }) => {
            let branch = client
                .get_branch(&name)
                .ok_or_else(|| failed(format!("get branch {name}")))?;
            print_json(&branch)
        },
        Command::Branch(BranchCommand::Create { name, from }) => {
            let branch = client
                .create_branch(&name, &from)
                .ok_or_else(|| failed(format!("create branch {name}")))?;
            print_json(&branch)
        },
        Command::Branch(BranchCommand::Delete { name }) => {
            succeeded(client.delete_branch(&name), format!("delete branch {name}"))
        },
        Command::Tag(TagCommand::Create { name, on }) => {
            let tag = client
                .create_tag(&name, &on)
                .ok_or_else(|| failed(format!("create tag {name}")))?;
            print_json(&tag)
        },
        Command::Tag(TagCommand::Delete { name }) => {
            succeeded(client.delete_tag(&name), format!("delete tag {name}"))
        },
        Command::MergeRequest(MergeRequestCommand::Create(args)) => {
            let request = args.into_request()?;
            let created = client
                .create_merge_request(&request)
                .ok_or_else(|| failed("create merge request"))?;
            print_json(&created)
        },
        Command::MergeRequest(MergeRequestCommand::Delete { iid }) => succeeded(
            client.delete_merge_request(MergeRequestIid::new(iid)),
            format!("delete merge request {iid}"),
        ),
        Command::MergeRequest(MergeRequestCommand::Merge { iid }) => {
            let merged = client.merge(MergeRequestIid::new(iid))?;
            print_json(&merged)
        },
        Command::Pipelines { iid } => {
            let pipelines = client
                .list_pipelines_by_merge_request(MergeRequestIid::new(iid))
                .ok_or_else(|| failed(format!("list pipelines for merge request {iid}")))?;
            print_json(&pipelines)
        },
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| WrapperError::GeneralError(e.to_string()))?;
    println!("{json}");
    Ok(())
}

fn succeeded(ok: bool, action: impl Into<CompactString>) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(failed(action))
    }
}

fn failed(action: impl Into<CompactString>) -> WrapperError {
    WrapperError::GeneralError(format!("Unable to {}", action.into()))
}
