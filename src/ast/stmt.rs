//! Statement AST nodes.

use indexmap::IndexMap;

/// A statement in the AST.
#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    /// 1-based source line of the statement (the opener for blocks).
    pub line: usize,
}

impl Stmt {
    pub fn new(kind: StmtKind, line: usize) -> Self {
        Self { kind, line }
    }

    /// The nested block, for statements that open one.
    pub fn body(&self) -> Option<&[Stmt]> {
        match &self.kind {
            StmtKind::Show(_) | StmtKind::Set { .. } | StmtKind::Data { .. } => None,
            StmtKind::If { body, .. }
            | StmtKind::Loop { body, .. }
            | StmtKind::Game(body)
            | StmtKind::Scene { body, .. }
            | StmtKind::Entity { body, .. }
            | StmtKind::Tick(body)
            | StmtKind::UiPage { body, .. }
            | StmtKind::Route { body, .. } => Some(body),
        }
    }

    /// Leading keyword, as written in source.
    pub fn keyword(&self) -> &'static str {
        self.kind.keyword()
    }
}

/// Statement variants. Expressions are raw source text.
#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    /// show <expr>
    Show(String),

    /// set <name> = <expr>
    Set { name: String, expr: String },

    /// if <cond> ... end
    If { condition: String, body: Vec<Stmt> },

    /// loop <count> ... end
    Loop { count: String, body: Vec<Stmt> },

    /// data <name> with `field = expr` lines ... end
    Data {
        name: String,
        fields: IndexMap<String, String>,
    },

    /// game start ... end
    Game(Vec<Stmt>),

    /// scene <name> ... end
    Scene { name: String, body: Vec<Stmt> },

    /// entity <name> ... end
    Entity { name: String, body: Vec<Stmt> },

    /// tick ... end
    Tick(Vec<Stmt>),

    /// ui page <name> ... end
    UiPage { name: String, body: Vec<Stmt> },

    /// route <path> ... end
    Route { path: String, body: Vec<Stmt> },
}

impl StmtKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            StmtKind::Show(_) => "show",
            StmtKind::Set { .. } => "set",
            StmtKind::If { .. } => "if",
            StmtKind::Loop { .. } => "loop",
            StmtKind::Data { .. } => "data",
            StmtKind::Game(_) => "game start",
            StmtKind::Scene { .. } => "scene",
            StmtKind::Entity { .. } => "entity",
            StmtKind::Tick(_) => "tick",
            StmtKind::UiPage { .. } => "ui page",
            StmtKind::Route { .. } => "route",
        }
    }
}

/// A whole program: the top-level block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl Program {
    pub fn new(statements: Vec<Stmt>) -> Self {
        Self { statements }
    }
}
