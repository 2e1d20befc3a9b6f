#[derive(Debug, Clone, Default)]
pub struct ExportCommand;

#[derive(Debug, Clone, Default)]
pub struct ImportCommand;
