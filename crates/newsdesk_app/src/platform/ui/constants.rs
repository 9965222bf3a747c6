pub const PROMPT: &str = "newsdesk> ";
pub const RULE: &str = "------------------------------------------------------------";

pub const HELP_TEXT: &str = "\
Commands:
  search <text>     search all news for <text>
  category <name>   show a news category
  categories        list the configured categories
  country <code>    top headlines for a country (e.g. us, in, fr)
  next | prev       move between result pages
  page <n>          jump to result page <n>
  open <n>          show article <n> with share links
  close             close the open article
  show              print the current page again
  reload            back to the default query
  help              this text
  quit              exit";
