//! Backend commands queued from UI to the backend worker.

pub enum BackendCommand {
    GenerateScenario,
    SetDraftScore { score: u8 },
    SubmitRating { score: u8 },
    ExportData,
}
