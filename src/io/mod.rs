/*!
# IO utilities

Textual data loading (paragraph-grouped files, `.sents` pair files) and saving
(`.sents` pair files, vocabularies and array containers).
!*/
pub mod reader;
pub mod writer;
