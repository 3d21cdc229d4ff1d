mod issue;
mod new_issue;
mod reference;
