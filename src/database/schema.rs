// Table definitions, applied in dependency order on startup and by `hrdocs init`.
//
// Employee and department reference each other (department.head_id,
// employee.department_id), so SQLite accepts the forward reference and checks it
// only when rows are written.

pub const TABLES: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS "user" (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name VARCHAR(32) NOT NULL UNIQUE,
        password TEXT NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS document (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        date_created DATETIME NOT NULL,
        date_updated DATETIME NOT NULL,
        category TEXT NOT NULL,
        has_comments BOOLEAN NOT NULL DEFAULT 0
    )"#,
    r#"CREATE TABLE IF NOT EXISTS position (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS department (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name VARCHAR(255) NOT NULL,
        description VARCHAR(500),
        head_id INTEGER REFERENCES employee(id)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS employee (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        fullname VARCHAR(90) NOT NULL,
        work_phone_number VARCHAR(20) NOT NULL,
        phone_number VARCHAR(20),
        office_number VARCHAR(10) NOT NULL,
        email TEXT NOT NULL,
        birth_day DATE,
        department_id INTEGER NOT NULL REFERENCES department(id),
        position_id INTEGER NOT NULL REFERENCES position(id),
        manager_id INTEGER REFERENCES employee(id),
        assistant_id INTEGER REFERENCES employee(id),
        other TEXT
    )"#,
    r#"CREATE TABLE IF NOT EXISTS comments (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        document_id INTEGER NOT NULL REFERENCES document(id),
        text TEXT NOT NULL,
        date_created DATETIME NOT NULL,
        date_updated DATETIME NOT NULL,
        author_id INTEGER NOT NULL REFERENCES employee(id),
        position_id INTEGER NOT NULL REFERENCES position(id)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS training_event (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        employee_id INTEGER NOT NULL REFERENCES employee(id),
        name VARCHAR(100) NOT NULL,
        start_date DATE NOT NULL,
        end_date DATE NOT NULL,
        description TEXT NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS absence_event (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        employee_id INTEGER NOT NULL REFERENCES employee(id),
        name VARCHAR(100) NOT NULL,
        start_date DATE NOT NULL,
        end_date DATE NOT NULL,
        description TEXT NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS vacation_event (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        employee_id INTEGER NOT NULL REFERENCES employee(id),
        name VARCHAR(100) NOT NULL,
        start_date DATE NOT NULL,
        end_date DATE NOT NULL,
        description TEXT NOT NULL
    )"#,
    r#"CREATE INDEX IF NOT EXISTS idx_comments_document ON comments(document_id)"#,
    r#"CREATE INDEX IF NOT EXISTS idx_employee_department ON employee(department_id)"#,
];

// Read-side views. Handlers list and fetch through these so foreign keys arrive
// already resolved to names.
pub const VIEWS: &[&str] = &[
    r#"CREATE VIEW IF NOT EXISTS employee_view AS
        SELECT e.id, e.fullname, d.name AS department, p.name AS position,
               e.work_phone_number, e.phone_number, e.office_number, e.email,
               e.birth_day, m.fullname AS manager, a.fullname AS assistant, e.other,
               e.department_id, e.position_id
        FROM employee e
        JOIN department d ON d.id = e.department_id
        JOIN position p ON p.id = e.position_id
        LEFT JOIN employee m ON m.id = e.manager_id
        LEFT JOIN employee a ON a.id = e.assistant_id"#,
    r#"CREATE VIEW IF NOT EXISTS department_view AS
        SELECT d.id, d.name, d.description, h.fullname AS head,
               (SELECT COUNT(*) FROM employee e WHERE e.department_id = d.id) AS employees_count
        FROM department d
        LEFT JOIN employee h ON h.id = d.head_id"#,
    r#"CREATE VIEW IF NOT EXISTS position_view AS
        SELECT p.id, p.name,
               (SELECT COUNT(*) FROM employee e WHERE e.position_id = p.id) AS employees_count
        FROM position p"#,
    r#"CREATE VIEW IF NOT EXISTS comment_view AS
        SELECT c.id, c.document_id, c.text, c.date_created, c.date_updated,
               e.fullname AS author_name, p.name AS author_position
        FROM comments c
        JOIN employee e ON e.id = c.author_id
        JOIN position p ON p.id = c.position_id"#,
];
