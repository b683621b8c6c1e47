// All LLM prompt templates for the generation pipeline.
// Placeholders are filled with llm_client::prompts::fill_template.

/// Default rubric of stylistic dimensions used to characterize tone.
pub const TONE_RUBRIC: &str = "\
1. Pace: The speed at which the story unfolds and events occur.
2. Mood: The overall emotional atmosphere or feeling of the piece.
3. Tone: The author's attitude towards the subject matter or characters.
4. Voice: The unique style and personality of the author as it comes through in the writing.
5. Diction: The choice of words and phrases used by the author.
6. Syntax: The arrangement of words and phrases to create well-formed sentences.
7. Imagery: The use of vivid and descriptive language to create mental images for the reader.
8. Theme: The central idea or message of the piece.
9. Point of View: The perspective from which the story is told (first person, third person, etc.).
10. Structure: The organization and arrangement of the piece, including its chapters, sections, or stanzas.
11. Dialogue: The conversations between characters in the piece.
12. Characterization: The way the author presents and develops characters in the story.
13. Setting: The time and place in which the story takes place.
14. Foreshadowing: The use of hints or clues to suggest future events in the story.
15. Irony: The use of words or situations to convey a meaning that is opposite of its literal meaning.
16. Symbolism: The use of objects, characters, or events to represent abstract ideas or concepts.
17. Allusion: A reference to another work of literature, person, or event within the piece.
18. Conflict: The struggle between opposing forces or characters in the story.
19. Suspense: The tension or excitement created by uncertainty about what will happen next in the story.
20. Climax: The turning point or most intense moment in the story.
21. Resolution: The conclusion of the story, where conflicts are resolved and loose ends are tied up.";

/// Tone analysis prompt. Replace: {rubric}, {posts}
pub const TONE_PROMPT_TEMPLATE: &str = r#"You are an AI Bot that is very good at generating writing in a similar tone as examples.
Be opinionated and have an active voice.
Take a strong stance with your response.

% HOW TO DESCRIBE TONE
{rubric}

% START OF EXAMPLES
{posts}
% END OF EXAMPLES

List out the tone qualities of the examples above"#;

/// Subject prompt. Replace: {posts}, {used_subjects}
pub const SUBJECT_PROMPT_TEMPLATE: &str = r#"% INSTRUCTIONS
 - You are an AI Bot that is very good at coming up with great ideas based on some input examples
 - These ideas must be in the style of the examples you are given, but be completely unique
 - The examples are a guide to show the typical subjects
 - Do not include any words from the examples in your response
 - Your goal is to write a subject for a new post based on the examples given
% START OF EXAMPLES
{posts}
% END OF EXAMPLES

Write the unique new subject of a post in under 4 words.
It must be COMPLETELY different from these previous subjects: {used_subjects}
Get creative, think about all the subjects used and imagine what else they might talk about"#;

/// Post synthesis prompt. Replace: {persona}, {max_chars}, {tone}, {posts}, {subject}
pub const POST_PROMPT_TEMPLATE: &str = r#"% INSTRUCTIONS
 - {persona}
 - Your goal is to write content with the tone that is described below.
 - The output must be in the style of the examples you are given, but be completely unique
 - Do not go outside the tone instructions below
% HOW TO DESCRIBE TONE
{tone}

% START OF EXAMPLES
{posts}
% END OF EXAMPLES

Write a post (under {max_chars} characters) in the same tone as the examples above about {subject} ."#;

/// Advisory length ceiling stated in the post prompt.
pub const MAX_POST_CHARS: usize = 300;

/// Rendering of an empty subject history inside the subject prompt.
pub const NO_PREVIOUS_SUBJECTS: &str = "none yet";
