//! Instruction template sent to the language model.

use std::fmt::Write as _;

use askql_core::SqlDialect;

/// One column of the table described to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub sql_type: &'static str,
    pub primary_key: bool,
    pub nullable: bool,
}

impl ColumnSpec {
    const fn new(name: &'static str, sql_type: &'static str) -> Self {
        Self {
            name,
            sql_type,
            primary_key: false,
            nullable: true,
        }
    }

    const fn primary_key(name: &'static str, sql_type: &'static str) -> Self {
        Self {
            name,
            sql_type,
            primary_key: true,
            nullable: false,
        }
    }
}

/// The table the model writes queries against.
///
/// This is knowledge handed to the model, nothing checks it against the
/// real database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    pub name: &'static str,
    pub columns: &'static [ColumnSpec],
    /// Column used for month/year predicates.
    pub date_column: &'static str,
}

impl TableSchema {
    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.name).collect()
    }
}

pub const SAMPLE_DATA: TableSchema = TableSchema {
    name: "Sample_Data",
    columns: &[
        ColumnSpec::primary_key("ID", "int"),
        ColumnSpec::new("Name", "varchar"),
        ColumnSpec::new("Age", "int"),
        ColumnSpec::new("City", "varchar"),
        ColumnSpec::new("Salary", "decimal"),
        ColumnSpec::new("Join_Date", "date"),
    ],
    date_column: "Join_Date",
};

/// Formats the instruction for one question.
#[derive(Debug, Clone, Copy)]
pub struct PromptBuilder {
    schema: TableSchema,
    dialect: SqlDialect,
}

impl PromptBuilder {
    pub fn new(schema: TableSchema, dialect: SqlDialect) -> Self {
        Self { schema, dialect }
    }

    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    pub fn dialect(&self) -> SqlDialect {
        self.dialect
    }

    /// Build the instruction. Any question is accepted verbatim, including "".
    pub fn build(&self, question: &str) -> String {
        let table = self.schema.name;
        let date_col = self.schema.date_column;
        let all_columns = self.schema.column_names().join(", ");

        let mut prompt = String::new();
        let _ = writeln!(prompt, "You are an AI that generates **valid {} queries**.", self.dialect);
        let _ = writeln!(prompt, "The table `{table}` has the following schema:");
        prompt.push('\n');
        for column in self.schema.columns {
            let constraint = if column.primary_key {
                "PRIMARY KEY"
            } else if column.nullable {
                "NULLABLE"
            } else {
                "NOT NULL"
            };
            let _ = writeln!(prompt, "- {} ({}) {}", column.name, column.sql_type, constraint);
        }
        prompt.push('\n');
        let _ = writeln!(prompt, "The user asked: \"{question}\"");
        prompt.push('\n');
        prompt.push_str("**Rules for Query Generation**:\n");
        prompt.push_str(
            "- If the user asks for a name containing an apostrophe (e.g., \"O'Brien\"), \
             escape the apostrophe by doubling it (e.g., \"O''Brien\").\n",
        );
        prompt.push_str("- If the user asks \"how many records\", generate a `COUNT(*)` query.\n");
        let _ = writeln!(
            prompt,
            "- If the user specifies a **month**, use `{}`.",
            self.dialect.month_predicate(date_col)
        );
        let _ = writeln!(
            prompt,
            "- If the user specifies a **year**, use `{}`.",
            self.dialect.year_predicate(date_col)
        );
        let _ = writeln!(
            prompt,
            "- When returning rows, always select the full column list: {all_columns}."
        );
        prompt.push_str("- Ensure the query is **100% correct**.\n");
        prompt.push('\n');
        prompt.push_str("**Example for Name \"O'Brien\"**:\n");
        prompt.push_str("```sql\n");
        let _ = writeln!(prompt, "SELECT {all_columns}");
        let _ = writeln!(prompt, "FROM {table}");
        prompt.push_str("WHERE Name = 'O''Brien';\n");
        prompt.push_str("```\n");
        prompt.push('\n');
        prompt.push_str("Now generate the SQL query based on the user's question.\n");
        prompt
    }
}
