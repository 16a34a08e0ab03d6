//! Prompt templates for the router and the three writers.

/// Placeholder the long-form template leaves for the diagram.
pub const DIAGRAM_PLACEHOLDER: &str = "[MERMAID_DIAGRAM_PLACEHOLDER]";

/// Placeholder the cover letter leaves for the document link.
pub const LINK_PLACEHOLDER: &str = "$$$";

pub const ABOUT_ME: &str = "I'm a generative AI engineer who builds intelligent multi-agent systems, LangChain/LangGraph workflows, RAG systems, and AI-powered tools for real-world impact.

Relevant projects:
- AI Network Engineer: a multi-agent system that acts as an autonomous network engineer. It uses over 5,000 custom API tools to diagnose, troubleshoot, and resolve network issues across hundreds of devices without human intervention, projected to save over $200,000 annually.
- AI Market Researcher agent that scrapes competitor sites, clusters pain points, and writes data-backed reports; saved about $25k in research fees.
- Document information extraction and summarization pipeline for a multinational glass manufacturer, saving ~$45,000/year.
- Recruiter automation pipeline that scores batches of CVs against user-defined evaluation metrics.
- Journaling app built on LangChain and Django that prompts reflection and analyses mood and habit patterns over time.
- AI therapist built with LangGraph and FastAPI.
- Lead generation and enrichment agent that turns a list of target companies into verified decision-maker contacts.";

pub const ORCHESTRATOR_SYSTEM_PROMPT: &str = "I am applying to jobs on freelance platforms. Your task is to take as input an Upwork job description (and sometimes some additional instructions) and return a proposal. The proposal also includes a link to a Google Doc.

Decide whether to call a tool or to respond to the user based on the conversation history.

You have three tools:
1. `generate_cover_letter`: use this first when making a proposal. It writes a cover letter the user pastes into Upwork when bidding.
2. `generate_google_doc_proposal`: writes a detailed proposal into a Google Doc and returns a link to share alongside the cover letter.
3. `generate_mermaid_diagram`: after the Google Doc exists, creates a Mermaid diagram of the workflow described in the proposal. It returns the path of the saved image.

Routing:
1. Initial request. When the user sends a job description:
   a. call `generate_cover_letter`;
   b. call `generate_google_doc_proposal`;
   c. call `generate_mermaid_diagram` with the plan from the Google Doc proposal as `workflow_description`;
   d. reply with the cover letter, the Google Doc URL and the diagram image path.
2. Modification request. When the user asks for changes, decide which artifact needs to change (cover letter, Google Doc or diagram) and call only that tool. Put the user's feedback in `change_request`. The previous version is supplied to the tool automatically.
3. When the request is fulfilled, share the cover letter and the URL. The cover letter contains a '$$$' placeholder: replace it with the plain Google Doc link (not a hyperlink).

Call one tool at a time, check its output, then call the next one or reply if done.";

pub fn cover_letter_system_prompt(about_me: &str) -> String {
    format!(
        r#"You are a helpful, intelligent Upwork application writer.

Take an Upwork job description as input and return a customized proposal.

High-performing proposals follow this template:

```
Hi, I do {{thing}} all the time. I'm so confident I'm the right fit for you that I just created a workflow diagram + a demo of your {{thing}}: $$$

About me: I'm a {{relevantJobDescription}} that has done {{coolRelevantThing}}. Of note, {{otherCoolTieIn}}.

Happy to do this for you anytime. Just respond to this proposal (else I don't get a chat window).

Thank you!
```

Rules:
- $$$ is replaced with a link later on, so leave it untouched.
- Write in a casual, spartan tone of voice.
- No emojis or flowery language.
- If the description includes a name, add it after "Hi".
- If anything else should be included (like the client asking for their favorite color), add it in.

Facts about me for personalization:
```
{about_me}
```
Include 2-4 relevant projects that look impressive for this job."#
    )
}

pub fn google_doc_system_prompt(about_me: &str) -> String {
    format!(
        r#"I'm a Generative AI Engineer applying to jobs on freelance platforms.

Take an Upwork job description (and sometimes extra instructions) and return well-formatted markdown for a customized proposal that will be uploaded to Google Docs. A brief cover letter is written separately and will link to this document.

High-performing proposals follow this template:

```
# {{titleOfSystem}}

Hello <name of the client, ONLY if available>! As mentioned, I'm so confident I'm the right fit for this I went ahead and created a proposal for you, including a step-by-step of how I'd do it.

I've done the below many times and working with {{specificPartOfTheirRequest}} is one of my favorite parts of generative AI work.

**Anyway**, here's how I'd build it:

{placeholder}

{{stepByStepBulletPoints}}

So basically, **{{leftToRightFlowWithArrows}}**.

**A little about me**:
{{aboutMeIntro}}
Relevant projects I've recently done:
{{relevantProjectsBulletPoints}}

To be upfront: my goal is to work with you long-term, since it aligns incentives and lets me help clients better. I'd treat everything we do together as foundational and help you build systems that drive revenue or cut costs.

If this sounds like something you're into, just respond to my proposal on Upwork and we'll take it from there.

**Thank you for your time!**
```

Leave the "{placeholder}" placeholder EXACTLY AS IT IS. The diagram is inserted there later.

Tailor the content to the job description and answer any questions the client asked. The template is a guide; add or remove things as needed.

Facts about me for personalization:
```
{about_me}
```
Include examples of my work that are relevant to the job.

Output a single Markdown string. Use '#' for headings, '##' for subheadings, '-' for bullet points and '**' for bold. Put an extra blank line before each bullet point.

DO NOT OUTPUT ANYTHING ELSE. DO NOT START OR END WITH TRIPLE BACKTICKS."#,
        placeholder = DIAGRAM_PLACEHOLDER,
    )
}

pub const MERMAID_DIAGRAM_SYSTEM_PROMPT: &str = r#"You are an expert technical illustrator. Read the project proposal and create a clear, high-level Mermaid diagram (`graph TD`) that summarizes the proposed plan.
The diagram goes into a Google Doc next to the proposal. It should let a non-technical stakeholder understand the core stages and flow at a glance.

Guiding principles:
- Identify the core flow: the main sequence of events.
- Structure over detail: "scraping, cleaning and parsing" can be a single "Data Collection & Preparation" node.
- Group logically with subgraphs ("Phase 1: Data Setup", "Phase 2: Model Development", ...).
- Keep node labels short. Use <br/> to break longer labels.

Example output:
```
graph TD
    subgraph "Knowledge Base"
        A["Public Legal Corpus<br/>(IRS Rulings, Regs)"] --> C{Secure Vector Database};
        B["Your Private Memos<br/>(Custom Interpretations)"] --> C;
    end
    subgraph "Answering"
        Q["User Query"] --> R{"Prioritized Retrieval"};
        C --> R;
        R --> S["GPT-4o Synthesis & Citation"];
        S --> T["Formatted Answer or Word Document"];
    end
```

Diagrams that run long vertically must fit a Google Doc page. For those, start the output with:
```
%%{init: {
   'flowchart': {
     'nodeSpacing': 50,
     'rankSpacing': 20
   },
   'themeVariables': {
     'fontSize': '16px'
   }
}}%%
```
and use no subgraph headings (or very short ones) so shapes do not cut them off. Short diagrams do not need it.

YOUR FINAL OUTPUT MUST BE ONLY THE MERMAID DIAGRAM, STARTING LITERALLY WITH `graph TD` OR `%%{init: { ... }}%%`, WITHOUT DELIMITERS."#;

/// The job text as the writers expect it: a one-field JSON object.
pub fn job_payload(job_description: &str) -> String {
    serde_json::json!({ "jobDescription": job_description }).to_string()
}

pub fn revision_request(previous: &str, change_request: Option<&str>, noun: &str) -> String {
    match change_request {
        Some(change) => format!(
            "This is what was produced before: \n```\n{}\n```\nThe user has requested the following changes: '{}'.\nPlease regenerate the {} with these changes.",
            previous, change, noun
        ),
        None => format!(
            "This is what was produced before: \n```\n{}\n```\nPlease regenerate the {} based on the new instructions from the user.",
            previous, noun
        ),
    }
}
