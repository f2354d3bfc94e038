use paperbrain_core::task::TaskKind;

/// Classification prompt listing every task kind with its examples.
pub fn build_router_prompt(query: &str) -> String {
    let mut prompt = String::from(
        "You are a query intent classifier for a research paper assistant.\n\
         Classify the user's question into exactly one task type.\n\n",
    );

    for kind in TaskKind::ALL {
        prompt.push_str(&format!("{}: use for {}.\n", kind.as_str(), kind.description()));
        let examples: Vec<String> = kind.examples().iter().map(|e| format!("'{e}'")).collect();
        prompt.push_str(&format!("  Examples: {}\n", examples.join(", ")));
    }

    let labels: Vec<&str> = TaskKind::ALL.iter().map(|k| k.as_str()).collect();
    prompt.push_str(&format!(
        "\nRespond with a single word: {}.\n\nQuestion: \"{}\"\nTask:",
        labels.join(", "),
        query.trim()
    ));
    prompt
}
