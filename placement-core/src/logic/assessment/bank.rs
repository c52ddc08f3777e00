//! MCQ bank for the CSE assessment

use super::McqQuestion;

/// Domain questions (CSE)
pub const CSE_DOMAIN_MCQS: &[McqQuestion] = &[
    McqQuestion {
        question: "Which of these is a process management concept in Operating Systems?",
        options: &["Memory Segmentation", "Deadlock", "File System", "Disk Scheduling"],
        correct: "Deadlock",
    },
    McqQuestion {
        question: "What is the primary purpose of SQL 'JOIN' clause?",
        options: &["To combine rows from two or more tables", "To filter records", "To sort data", "To group data"],
        correct: "To combine rows from two or more tables",
    },
    McqQuestion {
        question: "Which network topology connects all devices to a central hub?",
        options: &["Ring", "Bus", "Star", "Mesh"],
        correct: "Star",
    },
    McqQuestion {
        question: "What is an abstract class in Java?",
        options: &[
            "A class that cannot be instantiated",
            "A class with no methods",
            "A class that can only have static members",
            "A class that inherits from another class",
        ],
        correct: "A class that cannot be instantiated",
    },
    McqQuestion {
        question: "In cybersecurity, what is phishing?",
        options: &[
            "A type of malware",
            "Attempting to acquire sensitive information by masquerading as a trustworthy entity",
            "A technique to encrypt data",
            "A network attack that floods a system with traffic",
        ],
        correct: "Attempting to acquire sensitive information by masquerading as a trustworthy entity",
    },
    McqQuestion {
        question: "Which HTTP method is typically used to retrieve data from a server?",
        options: &["POST", "PUT", "GET", "DELETE"],
        correct: "GET",
    },
    McqQuestion {
        question: "What is the purpose of 'git clone'?",
        options: &[
            "To commit changes",
            "To create a new branch",
            "To copy a repository from a remote source",
            "To merge branches",
        ],
        correct: "To copy a repository from a remote source",
    },
    McqQuestion {
        question: "Which cloud computing service model provides virtualized computing resources over the internet?",
        options: &["SaaS", "PaaS", "IaaS", "DaaS"],
        correct: "IaaS",
    },
    McqQuestion {
        question: "What is a 'foreign key' in a relational database?",
        options: &[
            "A key that uniquely identifies a record",
            "A key that links two tables together",
            "A key used for encryption",
            "A key that sorts records",
        ],
        correct: "A key that links two tables together",
    },
    McqQuestion {
        question: "What is polymorphism in Object-Oriented Programming?",
        options: &[
            "Ability of an object to take on many forms",
            "Concept of data hiding",
            "Creating multiple instances of a class",
            "Mechanism of combining data and code",
        ],
        correct: "Ability of an object to take on many forms",
    },
];

/// Coding and DSA basics
pub const CODING_DSA_MCQS: &[McqQuestion] = &[
    McqQuestion {
        question: "What is the worst-case time complexity of Quick Sort?",
        options: &["O(n log n)", "O(n^2)", "O(log n)", "O(n)"],
        correct: "O(n^2)",
    },
    McqQuestion {
        question: "Which data structure uses LIFO (Last-In, First-Out) principle?",
        options: &["Queue", "Linked List", "Stack", "Array"],
        correct: "Stack",
    },
    McqQuestion {
        question: "What is the output of `print(2 + 3 * 4)` in Python?",
        options: &["20", "14", "24", "10"],
        correct: "14",
    },
    McqQuestion {
        question: "Which of these is a valid way to create a list in Python?",
        options: &["list = (1, 2, 3)", "list = [1, 2, 3]", "list = {1, 2, 3}", "list = <1, 2, 3>"],
        correct: "list = [1, 2, 3]",
    },
    McqQuestion {
        question: "What is the base case in a recursive function?",
        options: &[
            "The condition that stops the recursion",
            "The condition that causes an infinite loop",
            "The main function call",
            "The first call to the function",
        ],
        correct: "The condition that stops the recursion",
    },
    McqQuestion {
        question: "Which algorithm is used to find the shortest path in a weighted graph?",
        options: &["DFS", "BFS", "Dijkstra's Algorithm", "Kruskal's Algorithm"],
        correct: "Dijkstra's Algorithm",
    },
    McqQuestion {
        question: "What is hashing primarily used for?",
        options: &["Sorting data", "Encrypting data", "Fast data retrieval", "Compressing data"],
        correct: "Fast data retrieval",
    },
    McqQuestion {
        question: "If an array has 'n' elements, what is the maximum number of comparisons in a bubble sort in the worst case?",
        options: &["n", "n log n", "n^2", "n^2 / 2"],
        correct: "n^2",
    },
    McqQuestion {
        question: "What is the purpose of 'else' in an 'if-else' statement?",
        options: &[
            "To execute code if the condition is true",
            "To execute code if the condition is false",
            "To loop through code",
            "To declare a variable",
        ],
        correct: "To execute code if the condition is false",
    },
    McqQuestion {
        question: "Which of these is NOT a common tree traversal method?",
        options: &["Inorder", "Preorder", "Postorder", "Depth-first"],
        correct: "Depth-first",
    },
];
